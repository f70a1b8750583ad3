mod pp;

pub use pp::TaikoPP;
