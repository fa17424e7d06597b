pub mod consts;
pub mod games;
pub mod interface;
#[cfg(test)]
pub mod tests;
