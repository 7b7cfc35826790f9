// Job form: page, form session, handlers.
// All sheet writes go through `RowAppender` in state — no direct Sheets calls here.

pub mod form;
pub mod handlers;
pub mod page;
