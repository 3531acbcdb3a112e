pub mod log {
    pub use prism_log::*;
}

pub mod math {
    pub use prism_math::*;
}

pub mod formats {
    pub use prism_formats::*;
}

pub mod pal {
    pub mod prelude {
        pub use prism_formats::prelude::*;
        pub use prism_pal::prelude::*;
    }

    pub use prism_pal::*;
}
