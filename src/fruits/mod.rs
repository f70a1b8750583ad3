mod pp;

pub use pp::FruitsPP;
