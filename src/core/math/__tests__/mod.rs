pub mod normalization_test;
