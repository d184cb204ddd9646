//! Integration tests for [`handler_chain::HandlerChain`].
//!
//! Covers: an empty chain, a handler's Stop ending the chain, middleware `after` seeing the final
//! response, and handler errors propagating to the caller.

use std::sync::{Arc, Mutex};

use acrobot_core::{
    AcroError, Handler, HandlerResponse, InteractionKind, Message, Middleware, User,
};
use chrono::Utc;
use handler_chain::HandlerChain;

fn create_test_message(content: &str) -> Message {
    Message {
        id: "test_message_id".to_string(),
        team_id: "T1".to_string(),
        channel_id: "C1".to_string(),
        user: User {
            id: "U1".to_string(),
            username: Some("test_user".to_string()),
        },
        content: content.to_string(),
        kind: InteractionKind::Ambient,
        created_at: Utc::now(),
    }
}

/// Handler that records its name and returns a fixed response.
struct Named {
    name: &'static str,
    response: HandlerResponse,
    log: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait::async_trait]
impl Handler for Named {
    async fn handle(&self, _message: &Message) -> acrobot_core::Result<HandlerResponse> {
        self.log.lock().unwrap().push(self.name);
        Ok(self.response.clone())
    }
}

/// Middleware that keeps the response passed to `after`.
struct Capture {
    seen: Arc<Mutex<Option<HandlerResponse>>>,
}

#[async_trait::async_trait]
impl Middleware for Capture {
    async fn after(
        &self,
        _message: &Message,
        response: &HandlerResponse,
    ) -> acrobot_core::Result<()> {
        *self.seen.lock().unwrap() = Some(response.clone());
        Ok(())
    }
}

/// **Test: a chain with no handlers returns Continue.**
#[tokio::test]
async fn test_empty_chain_continues() {
    let chain = HandlerChain::new();
    let response = chain.handle(&create_test_message("hello")).await.unwrap();
    assert_eq!(response, HandlerResponse::Continue);
}

/// **Test: Stop from a handler ends the chain; later handlers do not run.**
#[tokio::test]
async fn test_handler_stop_ends_chain() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(Named {
            name: "first",
            response: HandlerResponse::Continue,
            log: log.clone(),
        }))
        .add_handler(Arc::new(Named {
            name: "editor",
            response: HandlerResponse::Stop,
            log: log.clone(),
        }))
        .add_handler(Arc::new(Named {
            name: "never",
            response: HandlerResponse::Reply("unreachable".to_string()),
            log: log.clone(),
        }));

    let response = chain.handle(&create_test_message("FYI")).await.unwrap();

    assert_eq!(response, HandlerResponse::Stop);
    assert_eq!(*log.lock().unwrap(), vec!["first", "editor"]);
}

/// **Test: middleware `after` receives the reply that ended the chain.**
#[tokio::test]
async fn test_after_sees_final_reply() {
    let seen = Arc::new(Mutex::new(None));
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_middleware(Arc::new(Capture { seen: seen.clone() }))
        .add_handler(Arc::new(Named {
            name: "router",
            response: HandlerResponse::Reply("pong".to_string()),
            log,
        }));

    chain.handle(&create_test_message("ping")).await.unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        Some(HandlerResponse::Reply("pong".to_string()))
    );
}

/// **Test: a handler error is returned to the caller and `after` is skipped.**
#[tokio::test]
async fn test_handler_error_propagates() {
    struct Failing;

    #[async_trait::async_trait]
    impl Handler for Failing {
        async fn handle(&self, _message: &Message) -> acrobot_core::Result<HandlerResponse> {
            Err(AcroError::Bot("send failed".to_string()))
        }
    }

    let seen = Arc::new(Mutex::new(None));
    let chain = HandlerChain::new()
        .add_middleware(Arc::new(Capture { seen: seen.clone() }))
        .add_handler(Arc::new(Failing));

    let result = chain.handle(&create_test_message("ping")).await;

    assert!(matches!(result, Err(AcroError::Bot(_))));
    assert!(seen.lock().unwrap().is_none());
}
