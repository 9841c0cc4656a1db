//! Integration tests for spinner frame rendering.

use std::sync::Arc;

use tether_render::{
    Color, FrameRenderer, Icon, IconSize, RenderError, Size, SpinnerGraphic, SvgSpinnerRenderer,
    DEFAULT_SPINNER_SVG,
};

fn opaque_pixels(icon: &Icon) -> usize {
    let pixels = icon.pixels().expect("rendered frame has pixels");
    pixels.data().chunks_exact(4).filter(|p| p[3] > 0).count()
}

#[test]
fn every_spinner_angle_renders() {
    let renderer = SvgSpinnerRenderer::new(SpinnerGraphic::from_svg(DEFAULT_SPINNER_SVG).unwrap());
    let size = IconSize::default();

    for step in 0..36 {
        let icon = renderer.render_frame(step as f32 * 10.0, size, 1.0);
        assert!(opaque_pixels(&icon) > 0, "frame {step} is blank");
    }
}

#[test]
fn colored_spinner_uses_color() {
    let graphic = SpinnerGraphic::default_spinner()
        .with_color(Color::from_rgb8(0, 0, 255))
        .unwrap();
    let icon = SvgSpinnerRenderer::new(graphic).render_frame(0.0, IconSize::square(48).unwrap(), 1.0);

    let pixels = icon.pixels().unwrap();
    let solid = pixels
        .data()
        .chunks_exact(4)
        .find(|p| p[3] == 255)
        .expect("stroke has solid pixels");
    assert_eq!(&solid[..3], &[0, 0, 255]);
}

#[test]
fn renderer_is_usable_as_trait_object() {
    let renderer: Arc<dyn FrameRenderer> = Arc::new(SvgSpinnerRenderer::default());
    let icon = renderer.render_frame(45.0, IconSize::new(32, 16).unwrap(), 1.0);
    let pixels = icon.pixels().unwrap();
    assert_eq!((pixels.width(), pixels.height()), (32, 16));
}

#[test]
fn icon_size_validation_reports_the_size() {
    let err = IconSize::try_from(Size::new(-2.0, 10.0)).unwrap_err();
    assert_eq!(
        err,
        RenderError::InvalidIconSize {
            width: -2.0,
            height: 10.0
        }
    );
    assert_eq!(err.to_string(), "invalid icon size: -2x10");
}
