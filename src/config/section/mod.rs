//! Configuration section definitions.
//!
//! Each module corresponds to a section in `svg2tsx.toml`:
//!
//! | Module     | TOML Section   | Purpose                                 |
//! |------------|----------------|-----------------------------------------|
//! | `icons`    | `[icons]`      | Output directories, export, colour      |
//! | `optimize` | `[optimize]`   | Optimization client and rule overrides  |
//! | `serve`    | `[serve]`      | Optimization server                     |

mod icons;
mod optimize;
mod serve;

pub use icons::{DEFAULT_ICON_TYPES, IconsConfig, ReplaceColorConfig};
pub use optimize::{DEFAULT_OPTIMIZE_URL, OptimizeConfig};
pub use serve::ServeConfig;
