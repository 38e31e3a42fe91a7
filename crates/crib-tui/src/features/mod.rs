pub mod code_entry;
pub mod countdown;
pub mod resend;
pub mod verification;
