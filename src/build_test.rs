use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};

use super::*;

use std::collections::BTreeMap;

// key type that can be ordered but not printed.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
struct Opaque(u32);

fn shape(node: Option<&Node<u32, u32>>, depth: usize, leaves: &mut Vec<usize>) {
    if let Some(node) = node {
        if node.left.is_none() && node.right.is_none() {
            leaves.push(depth);
        }
        shape(node.as_left_ref(), depth + 1, leaves);
        shape(node.as_right_ref(), depth + 1, leaves);
    }
}

#[test]
fn test_from_sorted() {
    for n in 0..200_u32 {
        let keys: Vec<u32> = (0..n).map(|i| i * 3).collect();
        let values: Vec<u32> = keys.iter().map(|k| k + 1).collect();
        let index = RankTree::from_sorted(keys.clone(), values).unwrap();

        index.validate().unwrap();
        assert_eq!(index.len(), n as usize);
        // minimal height, ceil(log2(n + 1)).
        assert_eq!(index.height(), (u32::BITS - n.leading_zeros()) as usize);
        let ks: Vec<u32> = index.iter().map(|(k, _)| *k).collect();
        assert_eq!(ks, keys);
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(index.find_by_rank(i + 1).unwrap(), key);
            assert_eq!(index.get(key), Some(&(key + 1)));
        }
    }
}

#[test]
fn test_from_sorted_invalid() {
    match RankTree::from_sorted(vec![1, 2, 2], vec![0, 0, 0]) {
        Err(Error::InvalidInput(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    match RankTree::from_sorted(vec![3, 1], vec![0, 0]) {
        Err(Error::InvalidInput(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    match RankTree::from_sorted(vec![1, 2], vec![0]) {
        Err(Error::InvalidInput(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
}

#[test]
fn test_from_sorted_then_mutate() {
    let seed: u64 = random();
    println!("test_from_sorted_then_mutate {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let keys: Vec<u32> = (0..1000).map(|i| i * 2).collect();
    let values = keys.clone();
    let mut btmap: BTreeMap<u32, u32> = keys.iter().map(|k| (*k, *k)).collect();
    let mut index = RankTree::from_sorted(keys, values).unwrap();

    for _i in 0..2000 {
        let key = rng.gen::<u32>() % 2000;
        match rng.gen::<bool>() {
            true => match (index.try_insert(key, key), btmap.contains_key(&key)) {
                (Ok(()), false) => {
                    btmap.insert(key, key);
                }
                (Err(entry), true) => assert_eq!(entry, (key, key)),
                (res, found) => panic!("insert {} {:?} {}", key, res, found),
            },
            false => match (index.remove(&key), btmap.remove(&key)) {
                (Ok(entry), Some(value)) => assert_eq!(entry, (key, value)),
                (Err(Error::KeyNotFound(_, _)), None) => (),
                (res, val) => panic!("remove {} {:?} {:?}", key, res, val),
            },
        }
        assert_eq!(index.len(), btmap.len());
    }

    index.validate().unwrap();
    let entries: Vec<(u32, u32)> = btmap.into_iter().collect();
    assert_eq!(index.to_vec(), entries);
}

#[test]
fn test_build_without_debug_keys() {
    let keys: Vec<Opaque> = (1..=5).map(Opaque).collect();
    let index = RankTree::from_sorted(keys, vec![(); 5]).unwrap();
    assert_eq!(index.len(), 5);
    assert!(*index.find_by_rank(3).unwrap() == Opaque(3));

    let res = RankTree::from_sorted(vec![Opaque(1), Opaque(3), Opaque(2)], vec![(); 3]);
    assert!(matches!(res, Err(Error::InvalidInput(_, _))));
    if let Err(err) = res {
        assert!(err.to_string().contains("index 2"), "{}", err);
    }

    let mut index: RankTree<Opaque, ()> = RankTree::with_shape(3);
    let entries = vec![(Opaque(7), ()), (Opaque(7), ()), (Opaque(9), ())];
    assert!(matches!(index.relabel(entries), Err(Error::InvalidInput(_, _))));
    index.relabel((1..=3).map(|k| (Opaque(k), ()))).unwrap();
    assert!(*index.find_by_rank(1).unwrap() == Opaque(1));
}

#[test]
fn test_with_shape() {
    for n in 0..300_usize {
        let index: RankTree<u32, u32> = RankTree::with_shape(n);
        assert_eq!(index.len(), n, "n:{}", n);

        // every leaf sits on one of the two bottom levels.
        let mut leaves = vec![];
        shape(index.root.as_deref(), 1, &mut leaves);
        let height = index.height();
        assert!(leaves.iter().all(|d| *d + 1 >= height), "n:{} {:?}", n, leaves);

        let mut index = index;
        let entries: Vec<(u32, u32)> = (0..n as u32).map(|k| (k + 10, k)).collect();
        index.relabel(entries.clone()).unwrap();
        index.validate().unwrap();
        assert_eq!(index.to_vec(), entries);
        assert_eq!(index.height(), height);
    }
}

#[test]
fn test_with_shape_bottom_leaves_pruned_from_right() {
    // 4 nodes out of a 7 node complete tree, the three rightmost bottom
    // leaves are gone.
    //        3
    //       / \
    //      2   4
    //     /
    //    1
    let mut index: RankTree<u32, u32> = RankTree::with_shape(4);
    index.relabel((1..=4).map(|k| (k, k))).unwrap();

    let root = index.root.as_deref().unwrap();
    assert_eq!(root.key, 3);
    assert_eq!(root.as_right_ref().map(|n| n.key), Some(4));
    assert_eq!(root.as_left_ref().map(|n| n.key), Some(2));
    assert_eq!(root.as_left_ref().unwrap().as_left_ref().map(|n| n.key), Some(1));
    assert!(root.as_left_ref().unwrap().as_right_ref().is_none());
}

#[test]
fn test_relabel_invalid() {
    let mut index: RankTree<u32, u32> = RankTree::with_shape(3);

    match index.relabel(vec![(1, 1), (2, 2)]) {
        Err(Error::InvalidInput(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    match index.relabel(vec![(1, 1), (3, 3), (2, 2)]) {
        Err(Error::InvalidInput(_, _)) => (),
        res => panic!("unexpected {:?}", res),
    }
    // untouched on failure.
    assert_eq!(index.to_vec(), vec![(0, 0), (0, 0), (0, 0)]);

    index.relabel(vec![(1, 1), (2, 2), (3, 3)]).unwrap();
    index.validate().unwrap();
}
