pub mod options;
pub mod profile;
pub mod response;

pub use options::ApplicationOptions;
pub use profile::Profile;
pub use response::{
    Action, ActionOutcome, DetectOutcome, FailureReply, FillContext, FillOutcome,
    FormDetectedNotice, FormType,
};
