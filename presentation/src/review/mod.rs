//! Terminal implementations of the proposal review port

mod stdin;

pub use stdin::StdinProposalReview;
