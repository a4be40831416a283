//! Card, pile and board types shared by the Klondike engine and its front-ends,
//! plus the text notations used to describe boards and move sequences.
pub mod action;
pub mod board;
pub mod card;
pub mod deck;
