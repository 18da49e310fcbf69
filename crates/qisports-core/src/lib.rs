pub mod anim;
pub mod config;
pub mod content;
pub mod controllers;
pub mod dom;
pub mod error;
pub mod navigation;
pub mod page;
pub mod runtime;
pub mod site;
pub mod timer;
pub mod trigger;

pub use anim::EasingType;
pub use config::AppConfig;
pub use content::SiteContent;
pub use error::{Error, Result};
pub use navigation::{Location, RouteChange};
pub use page::Page;
pub use runtime::{Runtime, Viewport};
pub use site::{Change, Site, TimelineEntry};
