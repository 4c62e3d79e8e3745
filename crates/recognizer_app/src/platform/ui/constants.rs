pub const PROMPT: &str = "> ";
pub const BAR_WIDTH: usize = 20;
pub const RULE: &str = "----------------------------------------";

pub const HELP: &str = "\
Files
  pick <path>...            replace the batch with these files (quote paths with spaces)
  toggle <n>...             select or deselect files
  all                       select all / deselect all
  preview                   preview the one selected file
  close-preview             close the preview
  upload                    send the selected files for recognition
Results
  rfeedback <row>           open the feedback form of a result
  rlabel <row> <action|n>   choose the correct action
  rcomment <row> <text>     add a comment
  rsubmit <row>             send the feedback
  rcancel <row>             close the form
History
  history                   show or hide processed videos
  refresh                   reload the history
  open <n>                  show details of a history entry
  close                     close the details
  feedback                  give feedback on the open details
  label <action|n>          choose the correct action
  comment <text>            add a comment
  submit                    send the feedback
  cancel                    close the feedback form
Other
  dismiss                   clear the error line
  help                      this text
  quit                      leave";
