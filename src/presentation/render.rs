// Text output for pages and single products
use crate::domain::model::{CacheStats, PageMeta, Product, ResultPage};
use crate::presentation::theme::Theme;
use std::fmt::Write;

const NAME_WIDTH: usize = 32;

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width - 1).collect();
        out.push('…');
        out
    }
}

fn product_row(product: &Product, theme: &Theme) -> String {
    let id = product
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    // 先按宽度补齐再着色，否则 ANSI 转义会打乱对齐
    format!(
        "  {} {} {} {} {}",
        (theme.idx)(&format!("{:>6}", id)),
        (theme.name)(&format!("{:<width$}", truncate(&product.name, NAME_WIDTH), width = NAME_WIDTH)),
        (theme.price)(&format!("{:>10.2}", product.price)),
        (theme.category)(&format!("{:<12}", product.category.as_upper())),
        theme.status(product.status.is_active(), product.status.as_str()),
    )
}

pub fn format_page(page: &ResultPage, theme: &Theme) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "  {:>6} {:<width$} {:>10} {:<12} {}",
        "ID",
        "NAME",
        "PRICE",
        "CATEGORY",
        "STATUS",
        width = NAME_WIDTH
    )
    .ok();
    writeln!(output, "  {}", (theme.line)(&"─".repeat(72))).ok();

    if page.is_empty() {
        writeln!(output, "  {}", (theme.hint)("No products found")).ok();
    }
    for product in &page.items {
        writeln!(output, "{}", product_row(product, theme)).ok();
    }

    writeln!(output, "  {}", (theme.line)(&"─".repeat(72))).ok();
    writeln!(output, "  {}", (theme.hint)(&format_meta(&page.meta))).ok();
    output
}

pub fn format_meta(meta: &PageMeta) -> String {
    match meta {
        PageMeta::Offset(m) => format!(
            "Page {} of {} ({} products, {} per page)",
            u64::from(m.page_index) + 1,
            m.total_pages.max(1),
            m.total_items,
            m.page_size
        ),
        PageMeta::Cursor(m) => {
            let mut parts = vec![format!("{} per page", m.page_size)];
            if let Some(next) = &m.next_cursor {
                parts.push(format!("next cursor: {}", next));
            }
            if !m.has_next {
                parts.push("last page".to_string());
            }
            parts.join(", ")
        }
    }
}

pub fn format_product(product: &Product, theme: &Theme) -> String {
    let mut output = String::new();
    let id = product
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());

    writeln!(output, "{} {}", (theme.title)(&product.name), (theme.idx)(&format!("#{}", id))).ok();
    writeln!(output, "  Price     {}", (theme.price)(&format!("{:.2}", product.price))).ok();
    writeln!(output, "  Category  {}", (theme.category)(product.category.as_title())).ok();
    writeln!(
        output,
        "  Status    {}",
        theme.status(product.status.is_active(), product.status.as_str())
    )
    .ok();
    output
}

pub fn format_cache_stats(stats: &CacheStats, theme: &Theme) -> String {
    let mut output = String::new();
    writeln!(output, "Cache: {} entries", stats.count).ok();
    for key in &stats.keys {
        writeln!(output, "  {}", (theme.hint)(key)).ok();
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::normalize::empty_page;
    use crate::domain::model::{Category, CursorMeta, OffsetMeta, PageRequest, ProductStatus};

    #[test]
    fn test_truncate_long_name() {
        assert_eq!(truncate("short", 10), "short");
        let long = truncate("a very long product name indeed", 10);
        assert_eq!(long.chars().count(), 10);
        assert!(long.ends_with('…'));
    }

    #[test]
    fn test_format_page_lists_products() {
        colored::control::set_override(false);
        let page = ResultPage {
            items: vec![Product {
                id: Some(3),
                name: "Phone X".to_string(),
                price: 99.99,
                category: Category::Electronics,
                status: ProductStatus::Active,
            }],
            meta: PageMeta::Offset(OffsetMeta {
                total_items: 1,
                total_pages: 1,
                page_index: 0,
                page_size: 10,
            }),
        };
        let out = format_page(&page, &Theme::from_name("mono"));
        assert!(out.contains("Phone X"));
        assert!(out.contains("99.99"));
        assert!(out.contains("ELECTRONICS"));
        assert!(out.contains("Page 1 of 1"));
    }

    #[test]
    fn test_format_cursor_meta() {
        let meta = PageMeta::Cursor(CursorMeta {
            next_cursor: None,
            previous_cursor: None,
            has_next: false,
            has_previous: true,
            page_size: 5,
        });
        assert_eq!(format_meta(&meta), "5 per page, last page");
    }

    #[test]
    fn test_format_meta_last_page_index() {
        let page = empty_page(&PageRequest::page(u32::MAX), 10);
        assert_eq!(
            format_meta(&page.meta),
            "Page 4294967296 of 1 (0 products, 10 per page)"
        );
    }
}
