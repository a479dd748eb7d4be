pub mod best4fest;
