use crate::{PrettyPrint, PrettyProvider, PrettyTree};
use std::ops::AddAssign;

mod hard_block;
mod hug;
mod k_and_r_bracket;
mod operator_chain;
mod sequence;
mod soft_block;

pub use self::{
    hard_block::HardBlock, hug::hug_operand, k_and_r_bracket::KAndRBracket,
    operator_chain::OperatorChain, sequence::PrettySequence, soft_block::SoftBlock,
};
