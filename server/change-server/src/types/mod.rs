pub mod change;

pub use change::{
    Agent, Change, ChangeRequest, ChangeRequestSpec, ChangeSpec, UnknownAgent, CHANGE_KIND,
    DEFAULT_BRANCH,
};
