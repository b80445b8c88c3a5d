use crate::store::{Registry, TypeId};
use std::collections::VecDeque;

/// Computes the C3 linearization of a new type from its ordered bases.
///
/// `chains` holds the already-computed linearization of every declared type,
/// indexed by `TypeId`. The result starts with `id` and lists every ancestor
/// exactly once, most derived first.
///
/// Returns `None` when the bases admit no consistent order
/// (e.g. `X(A, B)`, `Y(B, A)`, `Z(X, Y)`).
pub fn c3(id: TypeId, bases: &[TypeId], chains: &[Vec<TypeId>]) -> Option<Vec<TypeId>> {
    let mut seqs: Vec<VecDeque<TypeId>> = bases
        .iter()
        .map(|b| chains[b.index()].iter().copied().collect())
        .collect();
    seqs.push(bases.iter().copied().collect());

    let mut order = vec![id];
    loop {
        seqs.retain(|s| !s.is_empty());
        if seqs.is_empty() {
            return Some(order);
        }

        // A good head appears in no tail.
        let head = seqs
            .iter()
            .map(|s| s[0])
            .find(|&candidate| !seqs.iter().any(|s| s.iter().skip(1).any(|&t| t == candidate)))?;

        order.push(head);
        for s in seqs.iter_mut() {
            if s.front() == Some(&head) {
                s.pop_front();
            }
        }
    }
}

/// The ancestor chain of `cls`, oldest ancestor first and `cls` last.
pub fn ancestor_chain(registry: &Registry, cls: TypeId) -> Vec<TypeId> {
    registry.chain(cls).iter().rev().copied().collect()
}
