pub mod arena_test;
