//! Style rules and styling sessions built on the selector match engine.
//!
//! A [`Style`] pairs a selector with setters and implements
//! [`css_selectors::StyleRule`]. A [`StyleSession`] owns one generation of
//! styles together with the match cache built for it, and drives styling passes.

#![forbid(unsafe_code)]

mod session;
mod style;

pub use session::{StylePass, StyleSession, StyleSessionOptions};
pub use style::{Setter, Style, Subscription};
