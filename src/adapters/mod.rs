pub mod cor;
