use cairo::{Context, Error, TextExtents};

/// Adds aligned text drawing to [`Context`].
pub trait ShowTextAlign {
    /// Draws the text so that the alignment point of its bounding box lands on `(x, y)`.
    ///
    /// The alignment is a pair of fractions of the text's width and height. `(0.0, 0.0)` puts the
    /// bottom left corner of the text on the point, `(0.5, 0.5)` centers the text on it, and
    /// `(1.0, 1.0)` puts the top right corner on it.
    ///
    /// Returns the extents of the drawn text.
    fn show_text_align(
        &self,
        text: &str,
        point: (f64, f64),
        align: (f64, f64),
    ) -> Result<TextExtents, Error>;

    /// Draws the text rotated a quarter turn counter-clockwise, centered on `(x, y)`.
    fn show_text_vertical(&self, text: &str, point: (f64, f64)) -> Result<TextExtents, Error>;
}

impl ShowTextAlign for Context {
    fn show_text_align(
        &self,
        text: &str,
        (x, y): (f64, f64),
        align: (f64, f64),
    ) -> Result<TextExtents, Error> {
        let extents = self.text_extents(text)?;
        self.move_to(
            x - extents.x_bearing() - extents.width() * align.0,
            y - extents.y_bearing() - extents.height() * (1.0 - align.1),
        );
        self.show_text(text)?;
        Ok(extents)
    }

    fn show_text_vertical(&self, text: &str, (x, y): (f64, f64)) -> Result<TextExtents, Error> {
        self.save()?;
        self.translate(x, y);
        self.rotate(-std::f64::consts::FRAC_PI_2);
        let extents = self.show_text_align(text, (0.0, 0.0), (0.5, 0.5));
        self.restore()?;
        extents
    }
}
