//! Property-based tests for board mutations

use proptest::prelude::*;
use taskboard::domain::{
    apply_move, Board, IdGenerator, List, ListId, MoveDescriptor, Task, TaskId,
};
use taskboard::storage::{decode, encode};

/// Builds a board from per-list done flags, numbering lists and tasks from 1
fn board_from_shape(shape: &[Vec<bool>]) -> Board {
    let mut next = 0u64;
    let lists = shape
        .iter()
        .enumerate()
        .map(|(index, done)| {
            let tasks = done
                .iter()
                .map(|&is_done| {
                    next += 1;
                    let task = Task::new(TaskId::new(next), format!("task {}", next));
                    if is_done {
                        task.toggled()
                    } else {
                        task
                    }
                })
                .collect();
            List::new(ListId::new(index as u64 + 1), format!("list {}", index + 1))
                .with_tasks(tasks)
        })
        .collect();
    Board::new(lists)
}

/// Strategy for boards with one to five lists of up to six tasks
fn board_strategy() -> impl Strategy<Value = Board> {
    prop::collection::vec(prop::collection::vec(any::<bool>(), 0..6), 1..5)
        .prop_map(|shape| board_from_shape(&shape))
}

/// A mutation that never deletes anything; indices are reduced modulo the board
#[derive(Debug, Clone)]
enum Mutation {
    AddList,
    AddTask(usize),
    EditListTitle(usize),
    EditTaskTitle(usize, usize),
    Toggle(usize, usize),
    ReorderLists(usize, usize),
    MoveTask(usize, usize, usize, usize),
}

fn mutation_strategy() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        Just(Mutation::AddList),
        any::<usize>().prop_map(Mutation::AddTask),
        any::<usize>().prop_map(Mutation::EditListTitle),
        (any::<usize>(), any::<usize>()).prop_map(|(l, t)| Mutation::EditTaskTitle(l, t)),
        (any::<usize>(), any::<usize>()).prop_map(|(l, t)| Mutation::Toggle(l, t)),
        (any::<usize>(), any::<usize>()).prop_map(|(f, t)| Mutation::ReorderLists(f, t)),
        (any::<usize>(), any::<usize>(), any::<usize>(), any::<usize>())
            .prop_map(|(s, si, d, di)| Mutation::MoveTask(s, si, d, di)),
    ]
}

/// Picks an existing task, if the chosen list has any
fn pick_task(board: &Board, list: usize, task: usize) -> Option<(ListId, TaskId)> {
    let list = &board.lists[list % board.lists.len()];
    if list.is_empty() {
        return None;
    }
    Some((list.id, list.tasks[task % list.len()].id))
}

/// Applies `mutation`, returning the next board and the task it targeted
fn apply_mutation(board: &Board, mutation: &Mutation) -> (Board, Option<TaskId>) {
    let fresh = board.max_id().unwrap_or(0) + 1;
    let lists = board.lists.len();
    match *mutation {
        Mutation::AddList => (board.add_list(ListId::new(fresh), "added").unwrap(), None),
        Mutation::AddTask(l) => {
            let list = board.lists[l % lists].id;
            (board.add_task(list, TaskId::new(fresh), "added").unwrap(), None)
        }
        Mutation::EditListTitle(l) => {
            let list = board.lists[l % lists].id;
            (board.edit_list_title(list, "renamed").unwrap(), None)
        }
        Mutation::EditTaskTitle(l, t) => match pick_task(board, l, t) {
            Some((list, task)) => (
                board.edit_task_title(list, task, "renamed").unwrap(),
                Some(task),
            ),
            None => (board.clone(), None),
        },
        Mutation::Toggle(l, t) => match pick_task(board, l, t) {
            Some((list, task)) => (board.toggle_task_status(list, task), Some(task)),
            None => (board.clone(), None),
        },
        Mutation::ReorderLists(f, t) => (board.reorder_lists(f % lists, t % lists).unwrap(), None),
        Mutation::MoveTask(s, si, d, di) => {
            let source = &board.lists[s % lists];
            if source.is_empty() {
                return (board.clone(), None);
            }
            let dest = &board.lists[d % lists];
            let source_index = si % source.len();
            let dest_len = if source.id == dest.id { source.len() - 1 } else { dest.len() };
            let moved = source.tasks[source_index].id;
            let next = board
                .move_task(source.id, source_index, dest.id, di % (dest_len + 1))
                .unwrap();
            (next, Some(moved))
        }
    }
}

fn sorted_task_ids(board: &Board) -> Vec<u64> {
    let mut ids: Vec<u64> = board.task_ids().iter().map(|(_, t)| t.get()).collect();
    ids.sort_unstable();
    ids
}

proptest! {
    #[test]
    fn move_task_conserves_tasks(
        board in board_strategy(),
        src_pick in any::<usize>(),
        dst_pick in any::<usize>(),
        si_pick in any::<usize>(),
        di_pick in any::<usize>(),
    ) {
        let source = &board.lists[src_pick % board.lists.len()];
        prop_assume!(!source.is_empty());
        let dest = &board.lists[dst_pick % board.lists.len()];

        let source_index = si_pick % source.len();
        let dest_len = if source.id == dest.id { source.len() - 1 } else { dest.len() };
        let dest_index = di_pick % (dest_len + 1);
        let moved = source.tasks[source_index].clone();

        let next = board
            .move_task(source.id, source_index, dest.id, dest_index)
            .unwrap();

        prop_assert_eq!(next.task_count(), board.task_count());
        prop_assert_eq!(sorted_task_ids(&next), sorted_task_ids(&board));
        prop_assert_eq!(&next.list(dest.id).unwrap().tasks[dest_index], &moved);
        prop_assert_eq!(next.list_ids(), board.list_ids());
    }

    #[test]
    fn non_delete_mutations_preserve_identity(
        board in board_strategy(),
        mutation in mutation_strategy(),
    ) {
        let (next, touched) = apply_mutation(&board, &mutation);

        for id in board.list_ids() {
            prop_assert!(next.list(id).is_some(), "list {} lost", id);
        }
        for (list_id, task_id) in board.task_ids() {
            if Some(task_id) == touched {
                prop_assert!(next.task_ids().iter().any(|(_, t)| *t == task_id));
                continue;
            }
            prop_assert_eq!(next.task(list_id, task_id), board.task(list_id, task_id));
        }
        prop_assert!(next.task_count() >= board.task_count());
    }

    #[test]
    fn out_of_range_moves_leave_board_alone(
        board in board_strategy(),
        extra in 0usize..4,
    ) {
        let first = board.lists[0].id;
        let last = board.lists[board.lists.len() - 1].id;
        let too_far = board.lists[0].len() + extra;

        prop_assert!(board.move_task(first, too_far, last, 0).is_err());
        prop_assert!(board.reorder_lists(board.lists.len() + extra, 0).is_err());
    }

    #[test]
    fn reorder_lists_permutes(
        board in board_strategy(),
        from_pick in any::<usize>(),
        to_pick in any::<usize>(),
    ) {
        let from = from_pick % board.lists.len();
        let to = to_pick % board.lists.len();

        let next = board.reorder_lists(from, to).unwrap();

        prop_assert_eq!(&next.lists[to], &board.lists[from]);
        let mut before = board.list_ids();
        let mut after = next.list_ids();
        before.sort_unstable_by_key(|id| id.get());
        after.sort_unstable_by_key(|id| id.get());
        prop_assert_eq!(before, after);
        prop_assert_eq!(next.task_count(), board.task_count());
    }

    #[test]
    fn cancelled_moves_return_same_board(
        board in board_strategy(),
        index in 0usize..8,
    ) {
        let list = board.lists[0].id;

        let cancelled_task = MoveDescriptor::task(list, index, None);
        prop_assert_eq!(apply_move(&board, &cancelled_task).unwrap(), board.clone());

        let cancelled_list = MoveDescriptor::list(index, None);
        prop_assert_eq!(apply_move(&board, &cancelled_list).unwrap(), board);
    }

    #[test]
    fn delete_list_removes_exactly_its_tasks(
        board in board_strategy(),
        pick in any::<usize>(),
    ) {
        let victim = &board.lists[pick % board.lists.len()];

        let next = board.delete_list(victim.id);

        prop_assert_eq!(next.lists.len(), board.lists.len() - 1);
        prop_assert_eq!(next.task_count(), board.task_count() - victim.len());
        prop_assert!(next.list(victim.id).is_none());
    }

    #[test]
    fn encoded_board_decodes_unchanged(board in board_strategy()) {
        let text = encode(&board).unwrap();
        prop_assert_eq!(decode(&text).unwrap(), board);
    }

    #[test]
    fn ids_stay_ahead_of_loaded_boards(board in board_strategy(), start in 0u64..50) {
        let mut ids = IdGenerator::starting_at(start);
        if let Some(max) = board.max_id() {
            ids.observe(max);
        }

        let list_id = ids.next_list_id().unwrap();
        let task_id = ids.next_task_id().unwrap();

        prop_assert!(board.max_id().map_or(true, |max| list_id.get() > max));
        prop_assert!(task_id.get() > list_id.get());
        prop_assert!(board.list(list_id).is_none());
    }
}
