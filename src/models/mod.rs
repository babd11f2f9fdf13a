mod channel;
mod message_body;
mod outcome;
mod request;

pub use channel::Channel;
pub use message_body::MessageBody;
pub use outcome::OutcomeRecord;
pub use request::{
    MESSAGE_BUS_REQUEST_BODY_PARAM, MESSAGE_BUS_TOPIC_PARAM, NotificationRequest, NotifyParams,
    TARGET_PARAM,
};
