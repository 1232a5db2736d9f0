//! Domain records of the marketplace catalog

pub mod brand;
pub mod category;
pub mod product;
pub mod store;

pub use brand::{Brand, BrandFilter, BrandPatch, NewBrand};
pub use category::{Category, CategoryFilter, CategoryNode, CategoryPatch, NewCategory};
pub use product::{NewProduct, Product, ProductFilter, ProductPatch, ProductStatus};
pub use store::{NewStore, Store, StoreFilter, StorePatch, StoreStatus};
