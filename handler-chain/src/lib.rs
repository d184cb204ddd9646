//! # Handler chain
//!
//! Runs a sequence of middleware (before/after) and handlers for each inbound event. Middleware can stop
//! the chain; the first handler that returns Stop or Reply ends handler execution; after callbacks run in reverse order.

use acrobot_core::{Handler, HandlerResponse, Message, Middleware, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Chain of middleware and handlers. Order of `add_handler` calls is the dispatch priority.
#[derive(Clone, Default)]
pub struct HandlerChain {
    middleware: Vec<Arc<dyn Middleware>>,
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain (no middleware, no handlers).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a middleware (runs before handlers, after in reverse).
    pub fn add_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Appends a handler (runs in order; first Stop/Reply ends handler phase).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Runs middleware before, then handlers; then middleware after in reverse. Returns first Stop or Reply, or Continue.
    #[instrument(skip(self, message), fields(team_id = %message.team_id, channel_id = %message.channel_id, kind = message.kind.as_str()))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(message_id = %message.id, "step: handler_chain started");

        for mw in &self.middleware {
            if !mw.before(message).await? {
                info!(
                    middleware = %std::any::type_name_of_val(mw.as_ref()),
                    "step: middleware before returned false, chain stopped"
                );
                return Ok(HandlerResponse::Stop);
            }
        }

        let mut final_response = HandlerResponse::Continue;
        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            let response = handler.handle(message).await?;
            debug!(handler = %handler_name, response = ?response, "Handler processed");

            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    info!(handler = %handler_name, "step: handler chain stopped by handler");
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => continue,
            }
        }

        for mw in self.middleware.iter().rev() {
            mw.after(message, &final_response).await?;
        }

        info!(message_id = %message.id, "step: handler_chain finished");
        Ok(final_response)
    }
}
