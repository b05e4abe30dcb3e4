mod binary_files_are_rejected;
mod changes_at_file_edges_keep_nearby_context;
mod collapse_unchanged_lines_beyond_context;
mod identical_files_are_fully_collapsed;
mod oversized_files_fail_with_resource_limit;
mod show_side_by_side_diff_for_small_change;
mod show_whole_file_with_full_flag;
