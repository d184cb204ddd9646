//! Reply texts sent by the command router.

pub const PONG: &str = "pong";
pub const NEW_ACRONYM: &str = "Oooh, a new acronym! Thanks!";
pub const UPDATED: &str = "Thanks for the update!";
pub const UNKNOWN_DELETE: &str = "Sorry, I don't know that acronym.";
pub const UNKNOWN_QUERY: &str =
    "Well, this is a bit embarrassing... I'm afraid I don't know that one, but you can teach me!";
pub const NOT_AN_ACRONYM: &str = "Hmm, that doesn't look like an acronym to me.";
pub const LISTENING: &str = "Yep, I'm listening.";
pub const NOT_LISTENING: &str = "No, I'm not listening.";
pub const START_LISTENING: &str = "Ok, I'll keep an eye out for acronyms in here.";
pub const STOP_LISTENING: &str = "Ok, I'll stop listening in here.";
pub const NOT_UNDERSTOOD: &str = "Sorry, I don't understand what you mean.";

pub fn duplicate(key: &str) -> String {
    format!(
        "Sorry! '{}' has already been defined! Feel free to update it, though.",
        key
    )
}

pub fn deleted(key: &str) -> String {
    format!("Ok, I won't explain '{}' from now on.", key)
}

pub fn stands_for(key: &str, expansion: &str) -> String {
    format!("'{}' stands for '{}'", key, expansion)
}
