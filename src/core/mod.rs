//! Minishell core: the parsed command and the tokenizer that produces it.

pub mod command;
pub mod tokenizer;
