//! Offset pagination primitives shared by roster endpoints.
//!
//! A [`PageRequest`] is the validated pair of a one-based page number and a
//! page size. It knows how to locate its window inside a sequence of a given
//! length, and [`Paginated`] is the envelope returned to clients: the echoed
//! request, the number of matching items, the number of pages, and the items
//! of the requested page.
//!
//! Requests that point past the end of the sequence are valid and produce an
//! envelope with empty `data`.
//!
//! ```
//! use pagination::{PageRequest, Paginated};
//!
//! let request = PageRequest::new(3, 10).expect("positive page and size");
//! let page = Paginated::from_items((1..=23).collect::<Vec<u32>>(), request);
//! assert_eq!(page.data, vec![21, 22, 23]);
//! assert_eq!(page.total_pages, 3);
//! ```

mod envelope;
mod request;

pub use envelope::Paginated;
pub use request::{PageRequest, PageRequestError, total_pages};
