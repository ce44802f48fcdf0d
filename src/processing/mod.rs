mod batch;

pub use batch::apply_stamp_to_images;
