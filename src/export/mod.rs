/// Animation export: replay the frame sequence outside the native window.

pub mod html;
