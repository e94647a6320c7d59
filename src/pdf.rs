//! Order form rendering. One A4 document, Helvetica throughout, green accent
//! on category headers, page breaks whenever the cursor runs out of room so a
//! category is never cut off silently.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};

use crate::config::SupplierConfig;
use crate::orders::dto::{format_delivery_date, format_order_date};
use crate::orders::grouping::CategorySection;
use crate::orders::repo::Order;

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN: f64 = 18.0;
const BOTTOM: f64 = 20.0;
const QTY_COL: f64 = 112.0;
const UNIT_COL: f64 = 145.0;

// #15803d, same green as the admin UI
const ACCENT: (f64, f64, f64) = (0.082, 0.502, 0.239);

fn mm(v: f64) -> Mm {
    Mm(v as _)
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

struct Cursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f64,
}

impl Cursor<'_> {
    /// Starts a new page when fewer than `needed` millimeters remain.
    fn ensure_room(&mut self, needed: f64) {
        if self.y - needed < BOTTOM {
            let (page, layer) = self
                .doc
                .add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "content");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn text(&self, text: &str, size: f64, x: f64, font: &IndirectFontRef) {
        self.layer.use_text(text, size as _, mm(x), mm(self.y), font);
    }

    fn rule(&self) {
        let line = Line {
            points: vec![
                (Point::new(mm(MARGIN), mm(self.y)), false),
                (Point::new(mm(PAGE_WIDTH - MARGIN), mm(self.y)), false),
            ],
            is_closed: false,
        };
        self.layer.set_outline_thickness(0.4);
        self.layer.add_line(line);
    }

    fn set_color(&self, (r, g, b): (f64, f64, f64)) {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(r as _, g as _, b as _, None)));
    }
}

pub fn render_order_pdf(
    order: &Order,
    sections: &[CategorySection],
    supplier: &SupplierConfig,
) -> anyhow::Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Order {}", order.id),
        mm(PAGE_WIDTH),
        mm(PAGE_HEIGHT),
        "content",
    );
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| anyhow::anyhow!("pdf font: {e}"))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| anyhow::anyhow!("pdf font: {e}"))?,
    };

    let mut cur = Cursor {
        doc: &doc,
        layer: doc.get_page(page).get_layer(layer),
        y: PAGE_HEIGHT - MARGIN - 6.0,
    };

    draw_header(&mut cur, &fonts, order);
    draw_address_blocks(&mut cur, &fonts, order, supplier);
    for section in sections {
        draw_section(&mut cur, &fonts, section);
    }
    if let Some(comment) = order.comment.as_deref().filter(|c| !c.trim().is_empty()) {
        draw_comment(&mut cur, &fonts, comment);
    }
    drop(cur);

    doc.save_to_bytes()
        .map_err(|e| anyhow::anyhow!("pdf encode: {e}"))
}

fn draw_header(cur: &mut Cursor<'_>, fonts: &Fonts, order: &Order) {
    let title = "PURCHASE ORDER";
    cur.text(title, 20.0, centered_x(title, 20.0), &fonts.bold);
    cur.y -= 12.0;

    cur.text(&format!("Order no: {}", order.id), 10.0, MARGIN, &fonts.bold);
    cur.y -= 5.0;
    cur.text(
        &format!("Date: {}", format_order_date(order.order_date)),
        10.0,
        MARGIN,
        &fonts.regular,
    );
    cur.y -= 5.0;
    cur.text(
        &format!(
            "Requested delivery: {}",
            format_delivery_date(order.delivery_date)
        ),
        10.0,
        MARGIN,
        &fonts.bold,
    );
    cur.y -= 6.0;
    cur.rule();
    cur.y -= 8.0;
}

fn draw_address_blocks(
    cur: &mut Cursor<'_>,
    fonts: &Fonts,
    order: &Order,
    supplier: &SupplierConfig,
) {
    let top = cur.y;

    cur.text("Supplier:", 10.0, MARGIN, &fonts.bold);
    cur.y -= 5.0;
    for line in [
        supplier.name.as_str(),
        supplier.street.as_str(),
        supplier.city.as_str(),
        supplier.country.as_str(),
    ] {
        cur.text(line, 10.0, MARGIN, &fonts.regular);
        cur.y -= 5.0;
    }
    let left_bottom = cur.y;

    cur.y = top;
    let right = 120.0;
    cur.text("Delivery:", 10.0, right, &fonts.bold);
    cur.y -= 5.0;
    cur.text(&order.client_name, 12.0, right, &fonts.bold);
    cur.y -= 6.0;
    if let Some(address) = &order.client_address {
        for line in wrap_text(address, 38) {
            cur.text(&line, 10.0, right, &fonts.regular);
            cur.y -= 5.0;
        }
    }
    if let Some(phone) = &order.client_phone {
        cur.text(&format!("Tel: {phone}"), 10.0, right, &fonts.regular);
        cur.y -= 5.0;
    }

    cur.y = cur.y.min(left_bottom) - 6.0;
}

fn draw_section(cur: &mut Cursor<'_>, fonts: &Fonts, section: &CategorySection) {
    // Room for the title, the column header and at least one row, so a
    // section never starts as an orphan at the very bottom of a page.
    cur.ensure_room(22.0);

    cur.set_color(ACCENT);
    cur.text(&section.title.to_uppercase(), 12.0, MARGIN, &fonts.bold);
    cur.set_color((0.0, 0.0, 0.0));
    cur.y -= 7.0;

    cur.text("Item", 10.0, MARGIN, &fonts.bold);
    cur.text("Quantity", 10.0, QTY_COL, &fonts.bold);
    cur.text("Unit", 10.0, UNIT_COL, &fonts.bold);
    cur.y -= 2.0;
    cur.rule();
    cur.y -= 5.0;

    for item in &section.items {
        cur.ensure_room(6.0);
        cur.text(&item.product_name, 9.0, MARGIN, &fonts.regular);
        cur.text(&format_quantity(item.quantity), 9.0, QTY_COL, &fonts.regular);
        cur.text(&item.unit, 9.0, UNIT_COL, &fonts.regular);
        cur.y -= 6.0;
    }

    cur.rule();
    cur.y -= 8.0;
}

fn draw_comment(cur: &mut Cursor<'_>, fonts: &Fonts, comment: &str) {
    let lines = wrap_text(comment, 95);
    cur.ensure_room(10.0 + lines.len() as f64 * 5.0);
    cur.text("Comment:", 10.0, MARGIN, &fonts.bold);
    cur.y -= 5.0;
    for line in lines {
        cur.ensure_room(5.0);
        cur.text(&line, 10.0, MARGIN, &fonts.regular);
        cur.y -= 5.0;
    }
}

/// Rough centering for the builtin font; exact metrics are not worth carrying
/// for a single title line.
fn centered_x(text: &str, size: f64) -> f64 {
    let est_width = text.len() as f64 * size * 0.5 * 0.3528;
    ((PAGE_WIDTH - est_width) / 2.0).max(MARGIN)
}

fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{quantity:.0}")
    } else {
        format!("{quantity}")
    }
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::repo::OrderItem;
    use time::macros::{date, datetime};

    fn sample_order(comment: Option<&str>) -> Order {
        Order {
            id: "cmd42".into(),
            client_id: "client1".into(),
            client_name: "Chez Louise".into(),
            client_email: None,
            client_phone: Some("0601020304".into()),
            client_address: Some("3 rue des Halles, 75001 Paris".into()),
            delivery_date: Some(date!(2026 - 09 - 01)),
            comment: comment.map(Into::into),
            order_date: datetime!(2026-08-27 06:30:00 UTC),
        }
    }

    fn supplier() -> SupplierConfig {
        SupplierConfig {
            name: "SUPPLIER".into(),
            street: "1 Market St".into(),
            city: "Rungis".into(),
            country: "France".into(),
        }
    }

    fn section(title: &str, n_items: usize) -> CategorySection {
        CategorySection {
            category: format!("1: {title}"),
            title: title.into(),
            items: (0..n_items)
                .map(|i| OrderItem {
                    order_id: "cmd42".into(),
                    product_id: format!("p{i}"),
                    product_name: format!("Item {i}"),
                    product_image: None,
                    unit: "kg".into(),
                    quantity: 2.5,
                })
                .collect(),
        }
    }

    #[test]
    fn renders_a_pdf_byte_stream() {
        let bytes = render_order_pdf(
            &sample_order(Some("Back door")),
            &[section("Fruits", 3)],
            &supplier(),
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn renders_empty_order_without_sections() {
        let bytes = render_order_pdf(&sample_order(None), &[], &supplier()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_section_spills_onto_extra_pages() {
        let one_page =
            render_order_pdf(&sample_order(None), &[section("Fruits", 2)], &supplier()).unwrap();
        let many =
            render_order_pdf(&sample_order(None), &[section("Fruits", 120)], &supplier()).unwrap();
        // More pages means more page objects in the output.
        assert!(many.len() > one_page.len());
    }

    #[test]
    fn quantities_drop_trailing_zero_fraction() {
        assert_eq!(format_quantity(3.0), "3");
        assert_eq!(format_quantity(2.5), "2.5");
    }

    #[test]
    fn wrap_respects_word_boundaries() {
        let lines = wrap_text("one two three four", 9);
        assert_eq!(lines, ["one two", "three", "four"]);
        assert!(wrap_text("", 10).is_empty());
    }
}
