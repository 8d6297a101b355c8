mod common;
mod representative;
mod student;
