//! Plain-text views of the catalog and cart.

use std::io::{self, Write};

use nextbuy_core::{CartState, CartTotals, CatalogState, Product};

fn title(product: &Product) -> &str {
    product.title().unwrap_or("(untitled)")
}

pub fn write_catalog<W: Write>(out: &mut W, catalog: &CatalogState) -> io::Result<()> {
    writeln!(
        out,
        "Products ({} loaded, status: {})",
        catalog.data.len(),
        catalog.status
    )?;

    for product in &catalog.data {
        writeln!(
            out,
            "  [{:>4}] {:<40} {:>10}",
            product.id,
            title(product),
            product.unit_price().to_string()
        )?;
    }
    Ok(())
}

pub fn write_cart<W: Write>(out: &mut W, cart: &CartState) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Your cart is empty");
    }

    let totals = CartTotals::from(cart);
    writeln!(out, "Cart ({} items)", totals.total_quantity)?;

    for (line, total) in cart.items().iter().zip(&totals.lines) {
        writeln!(
            out,
            "  [{:>4}] {:<32} {:>9} x {:<3} = {:>10}",
            total.product_id,
            title(&line.item),
            total.unit_price.to_string(),
            total.qty,
            total.subtotal.to_string()
        )?;
    }

    writeln!(
        out,
        "Total Items: {}    Total Amount: {}",
        totals.total_quantity, totals.total_amount
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use nextbuy_core::Status;

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_cart() {
        let text = rendered(|out| write_cart(out, &CartState::new()));
        assert_eq!(text, "Your cart is empty\n");
    }

    #[test]
    fn test_cart_totals_line() {
        let mut cart = CartState::new();
        let backpack = Product::new(1, 9.99).with_field("title", "Backpack");
        cart.add(backpack.clone());
        cart.add(backpack);
        cart.add(Product::new(2, 4.5));

        let text = rendered(|out| write_cart(out, &cart));
        assert!(text.starts_with("Cart (3 items)"));
        assert!(text.contains("Backpack"));
        assert!(text.contains("$19.98"));
        assert!(text.contains("(untitled)"));
        assert!(text.contains("Total Items: 3    Total Amount: $24.48"));
    }

    #[test]
    fn test_catalog_header() {
        let mut catalog = CatalogState::new();
        catalog.set_products(vec![Product::new(3, 1.0)]);
        catalog.set_status(Status::Error);

        let text = rendered(|out| write_catalog(out, &catalog));
        assert!(text.starts_with("Products (1 loaded, status: error)"));
        assert!(text.contains("$1.00"));
    }
}
