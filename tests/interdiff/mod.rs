mod changes_made_in_both_revisions_are_shown_unchanged;
mod identical_revisions_show_no_new_changes;
mod reverted_changes_are_marked_as_previously_changed;
