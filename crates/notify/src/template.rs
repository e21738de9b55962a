//! Low-stock alert rendering.
//!
//! Pure data-to-markup functions; the workflow only supplies the fields.

use buynest_catalog::{Product, Supplier};

/// Subject line for a resupply request.
pub fn resupply_subject(product: &Product) -> String {
    format!("Resupply Request: {}", product.name)
}

/// Render the low-stock alert addressed to the product's supplier contact.
pub fn low_stock_alert(supplier: &Supplier, product: &Product) -> String {
    format!(
        r#"<div style="font-family: 'Segoe UI', Roboto, sans-serif; background-color: #f8fafc; padding: 20px; border-radius: 10px; color: #333; max-width: 600px; margin: auto;">
  <div style="text-align: center; margin-bottom: 20px;">
    <h2 style="color: #059669; margin: 0;">BuyNest Inventory Alert</h2>
    <p style="color: #64748b; font-size: 14px; margin-top: 4px;">Automated Supplier Notification</p>
  </div>
  <p>Dear <strong>{name}</strong>,</p>
  <p style="font-size: 15px; line-height: 1.6;">
    This is an automated notice from the <b>BuyNest Inventory System</b>.
    The following product has reached a low stock level:
  </p>
  <div style="background-color: #ecfdf5; border-left: 4px solid #10b981; padding: 12px 16px; margin: 16px 0; border-radius: 6px;">
    <p style="margin: 4px 0;"><b>Product Name:</b> {product_name}</p>
    <p style="margin: 4px 0;"><b>Product ID:</b> {product_id}</p>
    <p style="margin: 4px 0; color: #b91c1c;"><b>Current Stock:</b> {stock}</p>
  </div>
  <p style="font-size: 15px; line-height: 1.6;">
    Please arrange a <b>resupply</b> at the earliest convenience to avoid stock-out situations.
  </p>
  <div style="margin-top: 24px; text-align: center; font-size: 13px; color: #64748b;">
    <p style="margin: 0;">Thank you,</p>
    <p style="font-weight: 600; color: #059669; margin: 4px 0;">BuyNest Inventory Management System</p>
  </div>
</div>"#,
        name = supplier.name,
        product_name = product.name,
        product_id = product.product_id,
        stock = product.stock,
    )
}
