pub mod tourist_info;

pub use tourist_info::TouristInfo;
