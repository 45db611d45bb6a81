use std::io::Write;

use rand::rngs::StdRng;
use rand::SeedableRng;

use bst_avl::records::{self, LoadError};
use bst_avl::{compare, BalancedTree};

fn write_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn load_dedupes_and_feeds_a_tree() {
    let file = write_file(
        "cod_operacao;valor;uf\n\
         300;10,5;SP\n\
         100;\"1;000\";RJ\n\
         300;99;MG\n\
         ;7;BA\n\
         200;3;PR\n",
    );

    let dataset = records::load(file.path(), ';', "cod_operacao").unwrap();
    assert_eq!(dataset.keys().collect::<Vec<_>>(), ["300", "100", "200"]);
    assert_eq!(dataset.dropped_duplicates, 1);
    assert_eq!(dataset.dropped_blank, 1);

    let mut tree = BalancedTree::new();
    for (key, record) in &dataset.rows {
        tree.insert(key.clone(), record.clone());
    }

    let record = tree.search(&"100".to_string()).unwrap();
    assert_eq!(record.get("valor"), Some("1;000"));
    assert_eq!(tree.search(&"300".to_string()).unwrap().get("uf"), Some("SP"));
    assert_eq!(tree.count_nodes(), 3);
}

#[test]
fn compare_a_loaded_file() {
    let mut contents = String::from("id,payload\n");
    for i in 0..256 {
        contents.push_str(&format!("{:04},row {}\n", i, i));
    }
    let file = write_file(&contents);

    let dataset = records::load(file.path(), ',', "id").unwrap();
    let comparison = compare::compare(&dataset, 32, &mut StdRng::seed_from_u64(9));

    assert!(comparison.is_consistent());
    assert_eq!(comparison.ordered.height, 256);
    assert!((9..=11).contains(&comparison.balanced.height));
}

#[test]
fn wrong_key_column_is_an_error() {
    let file = write_file("a;b\n1;2\n");

    let err = records::load(file.path(), ';', "cod_operacao").unwrap_err();
    assert!(matches!(err, LoadError::MissingKeyColumn { .. }));
    assert_eq!(err.to_string(), "header has no column named \"cod_operacao\"");
}

#[test]
fn unreadable_line_names_file_and_line() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"id;v\n1;a\n2;\xff\xfe\n3;c\n").unwrap();

    let err = records::load(file.path(), ';', "id").unwrap_err();
    assert!(matches!(err, LoadError::Io { line: Some(3), .. }));
    assert_eq!(
        err.to_string(),
        format!("failed to read {} at line 3", file.path().display())
    );
}
