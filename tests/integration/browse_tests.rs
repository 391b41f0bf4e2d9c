use dirdupe::navigator::{run_session, Navigator};

use super::common::{dir, line, load};

#[test]
fn test_browse_loaded_tree() {
    let index = load(&[
        dir("."),
        dir("./photos"),
        dir("./photos/2021"),
        line("./photos/2021/beach.jpg", "h1", 10),
        line("./photos/2021/bench.jpg", "h2", 10),
        line("./photos/index.html", "h3", 10),
    ]);
    let mut nav = Navigator::new(index.tree());

    assert_eq!(nav.query(""), ["./"]);
    assert_eq!(nav.query("./"), ["./photos/"]);
    assert_eq!(nav.query("./photos/"), ["./photos/2021/", "./photos/index.html"]);
    assert_eq!(
        nav.query("./photos/2021/be"),
        ["./photos/2021/beach.jpg", "./photos/2021/bench.jpg"]
    );
    assert_eq!(nav.query("./photos/2021/bea"), ["./photos/2021/beach.jpg "]);
    assert!(nav.query("./videos/").is_empty());
}

#[test]
fn test_browse_backslash_tree() {
    let index = load(&[
        dir("."),
        dir(".\\docs"),
        line(".\\docs\\a.txt", "h1", 1),
    ]);
    let mut nav = Navigator::new(index.tree());

    assert_eq!(nav.query(""), [".\\"]);
    assert_eq!(nav.query(".\\d"), [".\\docs\\"]);
    assert_eq!(nav.query(".\\docs\\"), [".\\docs\\a.txt "]);
}

#[test]
fn test_session_over_loaded_tree() {
    let index = load(&[dir("./src"), line("./src/main.rs", "h", 1)]);
    let mut nav = Navigator::new(index.tree());
    let mut output = Vec::new();

    let answered = run_session(&mut nav, "./s\n./src/m\r\nnothing\n".as_bytes(), &mut output).unwrap();

    assert_eq!(answered, 3);
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "./src/\n\n./src/main.rs \n\n\n"
    );
}
