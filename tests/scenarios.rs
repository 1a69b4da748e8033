use easel::{
    Color, DrawableObject, Error, Font, MemorySurface, PixelBuffer, Point, RegionParameter, Scene,
    ShapeOptions, ShapeSpec, Stroke, Texture, Window, WindowOptions,
};

fn black(width: i32, height: i32) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(width, height).unwrap();
    buffer.clear(Color::BLACK);
    buffer
}

#[test_log::test]
fn red_square_on_black() {
    let mut buffer = black(10, 10);
    buffer
        .draw()
        .rectangle(0, 0, 5, 5, Color::RED, &ShapeOptions::new())
        .unwrap()
        .stop_drawing()
        .unwrap();

    assert_eq!(buffer.read_pixel(2, 2).unwrap(), Color::RED);
    assert_eq!(buffer.read_pixel(6, 6).unwrap(), Color::BLACK);
    assert_eq!(buffer.read_pixel(9, 9).unwrap(), Color::BLACK);
}

#[test_log::test]
fn white_square_composited_onto_black() {
    let mut base = Texture::new(4, 4).unwrap();
    base.buffer_mut().clear(Color::BLACK);
    let mut square = Texture::new(2, 2).unwrap();
    square.buffer_mut().clear(Color::WHITE);

    let out = base.composited(&square, 1, 1);
    for y in 0..4 {
        for x in 0..4 {
            let inside = (1..=2).contains(&x) && (1..=2).contains(&y);
            let expected = if inside { Color::WHITE } else { Color::BLACK };
            assert_eq!(out.read_pixel(x, y).unwrap(), expected);
        }
    }
    // inputs are left alone
    assert_eq!(base.read_pixel(1, 1).unwrap(), Color::BLACK);
}

#[test]
fn region_reads_report_the_offending_parameter() {
    let buffer = black(4, 4);
    let tag = |result: easel::Result<Vec<Color>>| result.unwrap_err().region_parameter();

    assert_eq!(tag(buffer.read_region(-1, 0, 1, 1)), Some(RegionParameter::X));
    assert_eq!(tag(buffer.read_region(0, -1, 1, 1)), Some(RegionParameter::Y));
    assert_eq!(tag(buffer.read_region(0, 0, 0, 1)), Some(RegionParameter::XSize));
    assert_eq!(tag(buffer.read_region(0, 0, 1, 0)), Some(RegionParameter::YSize));
    assert_eq!(
        buffer.read_region(-1, 0, 1, 1).unwrap_err().to_string(),
        "X"
    );
    assert_eq!(buffer.read_region(1, 1, 2, 2).unwrap().len(), 4);
}

#[test]
fn flood_fill_recolors_uniform_buffer_once() {
    let mut buffer = black(33, 21);
    let filled = easel::draw::flood_fill(&mut buffer, 30, 2, Color::GREEN);
    assert_eq!(filled, 33 * 21);
    assert!(buffer.pixels().iter().all(|&c| c == Color::GREEN));
}

#[test]
fn serialize_round_trip_through_bytes() {
    let mut buffer = black(5, 3);
    buffer
        .draw()
        .triangle(Point::new(0, 0), Point::new(5, 0), Point::new(0, 3), Color::CYAN, None)
        .unwrap()
        .tint_region(Color::WHITE, 0.5, 0, 0, 2, 2)
        .unwrap();
    let data = buffer.serialize();
    assert_eq!(data.bytes.len(), 5 * 3 * 4);
    assert_eq!(PixelBuffer::deserialize(&data.bytes, 5, 3).unwrap(), buffer);
}

#[test]
fn context_rejects_calls_after_stop() {
    let mut buffer = black(3, 3);
    let mut ctx = buffer.draw();
    ctx.pixel(0, 0, Color::RED).unwrap();
    ctx.stop_drawing().unwrap();
    assert!(matches!(
        ctx.line(Point::new(0, 0), Point::new(2, 2), 1, Color::RED),
        Err(Error::DrawingContextMisuse)
    ));
    assert!(matches!(ctx.stop_drawing(), Err(Error::DrawingContextMisuse)));
}

#[test_log::test]
fn window_frame_loop_renders_scene() {
    let mut scene = Scene::new("loop");
    scene.add_shape(ShapeSpec::Circle {
        x: 8,
        y: 8,
        radius: 4,
        color: Color::YELLOW,
        stroke: Some(Stroke::new(Color::RED, 1)),
    });

    let mut surface = MemorySurface::new(0, 0).close_after(3);
    let mut frames = 0;
    {
        let mut window = Window::new(&mut surface, WindowOptions::new(16, 16)).unwrap();
        while window.is_open() {
            scene.draw(&mut window, None).unwrap();
            window.render().unwrap();
            window.pump();
            frames += 1;
        }
    }
    assert_eq!(frames, 3);

    let frame = surface.last_frame().unwrap();
    assert_eq!(frame.read_pixel(8, 8).unwrap(), Color::YELLOW);
    assert_eq!(frame.read_pixel(12, 8).unwrap(), Color::RED);
    assert_eq!(frame.read_pixel(0, 0).unwrap(), Color::BLACK);
}

#[test_log::test]
fn text_is_drawn_through_the_context() {
    let font = Font::from_json(
        r#"{"version": "1.0", "letters": {"T": [[1, 1, 1], [0, 1, 0], [0, 1, 0]]}}"#,
    )
    .unwrap();
    let mut buffer = black(12, 6);
    buffer
        .draw()
        .text(&font, "TT", 1, 1, Color::WHITE)
        .unwrap();

    assert_eq!(buffer.read_pixel(1, 1).unwrap(), Color::WHITE);
    assert_eq!(buffer.read_pixel(2, 3).unwrap(), Color::WHITE);
    assert_eq!(buffer.read_pixel(1, 2).unwrap(), Color::BLACK);
    // second glyph starts after width 3 plus spacing 1
    assert_eq!(buffer.read_pixel(5, 1).unwrap(), Color::WHITE);
    assert_eq!(buffer.read_pixel(4, 1).unwrap(), Color::BLACK);
}

#[test]
fn unsupported_font_version_is_rejected() {
    assert!(matches!(
        Font::from_json(r#"{"version": "0.9", "letters": {}}"#),
        Err(Error::UnsupportedFontVersion { .. })
    ));
}
