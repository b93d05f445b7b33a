//! Content resolution for a CMS-driven marketing site.
//!
//! Remote page content arrives as an ordered list of loosely typed blocks.
//! This crate fetches it ([`gateway`]), keeps shared snapshots of it
//! ([`store`]) and turns every block into a fully defaulted view model
//! ([`sections`], [`page`]).

pub mod block;
pub mod carousel;
pub mod counter;
pub mod error;
pub mod events;
pub mod faq;
pub mod footer;
pub mod form;
pub mod gateway;
pub mod global;
pub mod lookup;
pub mod media;
pub mod page;
pub mod resolve;
pub mod sections;
pub mod slug;
pub mod store;

pub use block::{ContentBlock, GlobalPayload, PagePayload, Relation, SectionKind};
pub use error::{FetchFailure, GatewayError};
pub use faq::FaqView;
pub use footer::FooterView;
pub use gateway::{ContentGateway, ContentSource, MemorySource, StrapiClient};
pub use global::GlobalView;
pub use media::MediaResolver;
pub use page::{render_page, PageView, RenderedSection, SectionView};
pub use resolve::{resolve_section, FetchState, ResolveContext, Section};
pub use store::ContentStore;
