pub mod attachment;
pub mod label;
pub mod parameter;
pub mod status;
pub mod suite;
pub mod test_result;

pub use self::attachment::{Attachment, Content};
pub use self::label::{Label, LabelName, Severity};
pub use self::parameter::{Parameter, ParameterKind};
pub use self::status::{Status, StatusDetails};
pub use self::suite::Suite;
pub use self::test_result::{Case, Description, DescriptionKind, Step};
