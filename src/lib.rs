pub mod grid;
pub mod nav;
pub mod publications;
pub mod rain;
pub mod site;

#[cfg(not(target_arch = "wasm32"))]
pub mod citations;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
