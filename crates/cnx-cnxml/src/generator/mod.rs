//! CNXML content tree to HTML tree.
//!
//! [`Generator`] walks a document's `content` element with an explicit frame
//! stack instead of recursion, so deeply nested input cannot overflow the
//! call stack. Each frame holds the source children still to visit and the
//! HTML node they are written into.
//!
//! # Handlers
//!
//! Every CNXML tag maps to one handler. A handler emits the element's own
//! markup, then pushes a frame over the element's children with the output
//! node they belong in. Handlers are grouped by content kind:
//!
//! - `block`: paragraphs, sections, code, notes and the titled containers
//! - `inline`: emphasis, links, scripts and line breaks
//! - `list`: lists and items
//! - `figure`: equations, figures and subfigures
//! - `table`: CALS tables
//! - `media`: media selection and rendering
//!
//! Numbered containers receive their sequence number from the
//! [`Numbering`](crate::Numbering) built before generation. Elements with no
//! handler degrade to a visible placeholder and a `warn!` log line.

mod block;
mod engine;
mod figure;
mod inline;
mod list;
mod media;
mod table;

pub use engine::Generator;
