pub mod ast;
pub mod error;
pub mod evaluator;
pub mod executor;
pub mod parser;
pub mod scanner;
pub mod token;
pub mod value;

pub use ast::{Atom, Expr, LogicOp, MathOp, RelOp};
pub use error::Error;
pub use executor::execute;
pub use parser::{Parser, Select};
pub use scanner::Scanner;
pub use token::{Token, TokenKind};
pub use value::{Record, Value};
