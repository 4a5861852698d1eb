pub mod params;
pub mod schema;

pub use params::{ParamDef, Params};
pub use schema::{BrowserConfig, Contract, FieldSelectors, OnFailure, PageContract, ResultContract, Timeouts, Viewport};
