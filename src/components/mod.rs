//! UI components: the auth panel and the chat view it hands off to.

pub mod auth_form;
pub mod chat_shell;
pub mod message_bubble;
pub mod message_input;
pub mod navbar;
pub mod notice_stack;
