use proptest::prelude::*;
use table_controller::{Document, ElementNode, PageController, PageOptions, fixture};

const DEFAULT_PROPTEST_CASES: u32 = 64;

fn proptest_cases() -> u32 {
    std::env::var("TABLE_CONTROLLER_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_PROPTEST_CASES)
}

/// The exercise page with `extra` additional cells in a fourth row
fn page_with_extra_cells(extra: usize) -> Document {
    let mut root = fixture::exam_page_element();
    let row = ElementNode::new("tr")
        .with_children((0..extra).map(|_| ElementNode::new("td")).collect());
    root.children[0].add_child(row);
    Document::from_element(&root)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(proptest_cases()))]

    #[test]
    fn big_array_iff_cells_exceed_threshold(extra in 0usize..24, threshold in 0usize..32) {
        let doc = page_with_extra_cells(extra);
        let cells = 9 + extra;
        prop_assert_eq!(doc.get_elements_by_tag_name("td").len(), cells);

        let mut page = PageController::with_options(
            doc,
            PageOptions::new().big_array_threshold(threshold),
        );
        page.load().unwrap();

        let expected = if cells > threshold { "Big Array!" } else { "Small Array!" };
        prop_assert_eq!(page.console().messages(), vec![expected]);
    }

    #[test]
    fn add_delete_sequences_track_cell_presence(ops in proptest::collection::vec(any::<bool>(), 0..16)) {
        let mut page = PageController::new(fixture::exam_page());
        page.load().unwrap();
        let mut present = 0usize;

        for add in ops {
            if add {
                page.click("#addButton").unwrap();
                present += 1;
            } else if present > 0 {
                page.delete_element().unwrap();
                present -= 1;
            } else {
                prop_assert!(page.delete_element().is_err());
            }
            let extras = page.document().query_selector_all("#extracell").unwrap();
            prop_assert_eq!(extras.len(), present);
        }
    }
}

#[test]
fn nine_cells_is_small() {
    let mut page = PageController::new(page_with_extra_cells(0));
    page.load().unwrap();
    assert_eq!(page.console().messages(), vec!["Small Array!"]);
}
