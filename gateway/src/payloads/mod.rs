mod payload;
pub use payload::{Hello, Opcode, Payload};

mod frame;
pub use frame::{Frame, IdentifyData};

mod event;
pub use event::{Event, Ready};
