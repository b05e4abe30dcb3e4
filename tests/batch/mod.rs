mod summarise_every_file_in_two_trees;
