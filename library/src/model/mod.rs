pub mod image;
pub mod pin;
pub mod value;

pub use self::image::{Image, PixelLayout};
pub use self::pin::{PinDataType, PinDefinition, PinDirection};
pub use self::value::{NodeInputs, NodeValue, TryGetValue};
