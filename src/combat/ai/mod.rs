//! Combat domain: AI system modules for the bull and the snail.

pub(crate) mod bull;
pub(crate) mod snail;

pub(crate) use bull::update_bulls;
pub(crate) use snail::update_snails;
