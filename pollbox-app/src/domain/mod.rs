mod page;
mod poll;
mod results;
mod vote;

pub use page::{PageRequest, Paginated};
pub use poll::{NewPoll, Poll, PollOption};
pub use results::{OptionTally, PollResults};
pub use vote::{Vote, VoteReceipt};
