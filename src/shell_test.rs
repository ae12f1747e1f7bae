use super::*;

fn run(shell: &mut Shell, script: &str) -> (String, Vec<Step>) {
    let mut out: Vec<u8> = vec![];
    let mut steps = vec![];
    for line in script.lines() {
        let step = shell.execute(line, &mut out).unwrap();
        steps.push(step);
        if step == Step::Stop {
            break;
        }
    }
    (String::from_utf8(out).unwrap(), steps)
}

#[test]
fn test_session() {
    let script = "\
# a comment
#
Init
AddArtist 1
AddArtist 1
AddArtist 0
AddSong 1 10
AddSong 1 20
AddSong 2 10
AddToSongCount 1 20 5
GetArtistBestSong 1
GetArtistBestSong 2
GetRecommendedSongInPlace 1
GetRecommendedSongInPlace 2
GetRecommendedSongInPlace 3
GetRecommendedSongInPlace -1
RemoveArtist 1
RemoveSong 1 10
RemoveSong 1 20
RemoveArtist 1
Init
Quit
";
    let ref_out = "\
# a comment
init done.
AddArtist: SUCCESS
AddArtist: FAILURE
AddArtist: INVALID_INPUT
AddSong: SUCCESS
AddSong: SUCCESS
AddSong: FAILURE
AddToSongCount: SUCCESS
GetArtistBestSong: 20
GetArtistBestSong: FAILURE
GetRecommendedSongInPlace: Artist 1 Song 20
GetRecommendedSongInPlace: Artist 1 Song 10
GetRecommendedSongInPlace: FAILURE
GetRecommendedSongInPlace: INVALID_INPUT
RemoveArtist: FAILURE
RemoveSong: SUCCESS
RemoveSong: SUCCESS
RemoveArtist: SUCCESS
init was already called.
quit done.
";
    let mut shell = Shell::new();
    let (out, steps) = run(&mut shell, script);
    assert_eq!(out, ref_out);
    assert!(steps.iter().all(|s| *s == Step::Continue));
    assert!(shell.as_manager().is_none());
}

#[test]
fn test_before_init() {
    let mut shell = Shell::new();
    let (out, _) = run(&mut shell, "AddArtist 1\nGetRecommendedSongInPlace 1\n");
    assert_eq!(out, "AddArtist: INVALID_INPUT\nGetRecommendedSongInPlace: INVALID_INPUT\n");

    let (out, _) = run(&mut shell, "Init\nQuit\nAddArtist 1\n");
    assert_eq!(out, "init done.\nquit done.\nAddArtist: INVALID_INPUT\n");
}

#[test]
fn test_stop() {
    let mut shell = Shell::new();
    let (out, steps) = run(&mut shell, "Init\nAddSong 1\nAddArtist 1\n");
    assert_eq!(out, "init done.\nAddSong failed.\n");
    assert_eq!(steps, vec![Step::Continue, Step::Stop]);

    let (out, steps) = run(&mut shell, "AddArtist x\n");
    assert_eq!(out, "AddArtist failed.\n");
    assert_eq!(steps, vec![Step::Stop]);

    let (out, steps) = run(&mut shell, "Frobnicate 1\nAddArtist 1\n");
    assert_eq!(out, "");
    assert_eq!(steps, vec![Step::Stop]);

    let mut out: Vec<u8> = vec![];
    assert_eq!(shell.execute("", &mut out).unwrap(), Step::Stop);
    assert_eq!(shell.execute("   \r\n", &mut out).unwrap(), Step::Stop);
    assert!(out.is_empty());
}

#[test]
fn test_trailing_arguments() {
    let mut shell = Shell::new();
    let (out, _) = run(&mut shell, "Init\nAddArtist 3 junk\nAddSong 3 4 5\r\n");
    assert_eq!(out, "init done.\nAddArtist: SUCCESS\nAddSong: SUCCESS\n");
    let mm = shell.as_manager().unwrap();
    assert_eq!(mm.n_songs(), 1);
}
