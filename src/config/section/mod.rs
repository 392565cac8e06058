//! Configuration section definitions.
//!
//! Each module corresponds to a section in `docship.toml`:
//!
//! | Module   | TOML Section | Purpose                                 |
//! |----------|--------------|-----------------------------------------|
//! | `build`  | `[build]`    | Paths, generator, markdown, hooks       |
//! | `deploy` | `[deploy]`   | Publish target and snapshot identity    |
//! | `site`   | `[site]`     | Title, description, navigation          |

pub mod build;
mod deploy;
pub mod site;

pub use build::{BuildSectionConfig, GeneratorKind, HookConfig};
pub use deploy::{AuthorConfig, DeployConfig};
pub use site::{NavItem, SiteSectionConfig};
