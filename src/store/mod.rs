//! Persistence layer: the credential store (`users`) and the
//! ownership-enforced task service (`todos`). All three front-ends (the HTTP
//! routes, the chat tool adapter, and the stdio tool server) call through
//! this single contract.

pub mod todos;
pub mod users;
