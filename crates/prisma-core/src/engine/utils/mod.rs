pub mod cyclic;
