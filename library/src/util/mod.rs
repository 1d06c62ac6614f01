pub mod template;

pub use self::template::{TemplateValue, render_template};
