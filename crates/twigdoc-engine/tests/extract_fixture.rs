//! Extraction over a realistic administration component template.

use pretty_assertions::assert_eq;
use twigdoc_engine::{extract_fragments, pretty_html};

const CARD_DOC: &str = include_str!("fixtures/sw-product-card.html.twig");

#[test]
fn test_card_block_names_in_source_order() {
    let fragments = extract_fragments(CARD_DOC).unwrap();
    let names: Vec<_> = fragments.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "sw_product_card",
            "sw_product_card_header",
            "sw_product_card_header_title",
            "sw_product_card_header_actions",
            "sw_product_card_content",
            "sw_product_card_image",
            "sw_product_card_description",
            "sw_product_card_footer",
        ]
    );
}

#[test]
fn test_card_leaf_blocks() {
    let fragments = extract_fragments(CARD_DOC).unwrap();
    let code = |name: &str| {
        fragments
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.code.clone())
            .unwrap()
    };

    assert_eq!(
        code("sw_product_card_header_title"),
        r#"<h3 class="sw-product-card__title">{{ product.name }}</h3>"#
    );
    assert_eq!(
        code("sw_product_card_header_actions"),
        r#"<sw-button size="small" @click="onEdit">{{ $tc('global.default.edit') }}</sw-button>"#
    );
    assert_eq!(
        code("sw_product_card_image"),
        r#"<img :src="product.cover" :alt="product.name">"#
    );
    assert_eq!(
        code("sw_product_card_description"),
        "<p v-if=\"product.description\">{{ product.description }}</p>\n<slot name=\"description\" :product=\"product\"></slot>"
    );
}

#[test]
fn test_card_outer_block_contains_nested_output() {
    let fragments = extract_fragments(CARD_DOC).unwrap();
    let outer = &fragments[0].code;
    assert!(outer.starts_with(
        r#"<sw-card class="sw-product-card" :title="$tc('sw-product.detail.cardTitle')" :is-loading="isLoading">"#
    ));
    assert!(outer.ends_with("</sw-card>"));
    assert!(!outer.contains("{%"));
    assert!(!outer.contains("image and description"));
}

#[test]
fn test_card_outer_block_snapshot() {
    let fragments = extract_fragments(CARD_DOC).unwrap();
    insta::assert_snapshot!(fragments[0].code, @r###"
<sw-card class="sw-product-card" :title="$tc('sw-product.detail.cardTitle')" :is-loading="isLoading">
  <template #header>
    <div class="sw-product-card__header">
      <h3 class="sw-product-card__title">{{ product.name }}</h3>
      <sw-button size="small" @click="onEdit">{{ $tc('global.default.edit') }}</sw-button>
    </div>
  </template>
  <div class="sw-product-card__content">
    <img :src="product.cover" :alt="product.name">
    <p v-if="product.description">{{ product.description }}</p>
    <slot name="description" :product="product"></slot>
  </div>
  <template #footer>
    <slot name="footer" v-bind="{ product, isLoading }"></slot>
  </template>
</sw-card>
"###);
}

#[test]
fn test_card_fragments_are_already_pretty() {
    for fragment in extract_fragments(CARD_DOC).unwrap() {
        assert_eq!(pretty_html(&fragment.code), fragment.code, "{}", fragment.name);
    }
}
