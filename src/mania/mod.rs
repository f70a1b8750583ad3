mod pp;

pub use pp::ManiaPP;
