mod add;

pub use add::AddFeedback as Add;
